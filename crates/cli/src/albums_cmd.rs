use anyhow::Result;

use picfolio_sync::CreateOutcome;

use crate::{bound_client, photos_cmd, AlbumsAction};

pub async fn run(user: Option<String>, action: AlbumsAction) -> Result<()> {
    let client = bound_client(user).await?;
    let albums = client.albums();

    match action {
        AlbumsAction::List => {
            let summaries = albums.albums();
            if summaries.is_empty() {
                println!("No albums yet.");
                return Ok(());
            }
            for album in summaries {
                let date = album.start_date.as_deref().unwrap_or("-");
                let cover = album.cover_photo_id.as_deref().unwrap_or("-");
                println!("{}  {}  (date {date}, cover {cover})", album.id, album.title);
            }
        }

        AlbumsAction::Show { album_id } => {
            let detail = albums.open_detail_for(&album_id).await?;
            println!("{} ({} photos)", detail.summary.title, detail.photo_ids().len());
            photos_cmd::print_groups(&detail.groups, &client);
        }

        AlbumsAction::Create { title, photos } => {
            match albums.create(&title, &photos).await? {
                CreateOutcome::Created(album) => {
                    println!("Created album {} ({}).", album.title, album.id);
                }
                // Partial outcomes are successes with a caveat; keep the
                // messaging clearly distinct from a failure.
                CreateOutcome::PhotosNotAttached { album, error } => {
                    println!("Created album {} ({}).", album.title, album.id);
                    println!("warning: photos could not be attached: {error}");
                }
                CreateOutcome::Unresolved { title } => {
                    println!("Created album {title}.");
                    println!(
                        "warning: the new album has not appeared in the listing yet; \
                         photos were not attached"
                    );
                }
            }
        }

        AlbumsAction::Rename { album_id, title } => {
            albums.rename(&album_id, &title).await?;
            println!("Renamed {album_id} to {title}.");
        }

        AlbumsAction::Redate { album_id, date } => {
            albums.redate(&album_id, &date).await?;
            println!("Updated date of {album_id} to {date}.");
        }

        AlbumsAction::Delete { album_id } => {
            albums.delete(&album_id).await?;
            println!("Deleted {album_id}.");
        }

        AlbumsAction::AddPhotos { album_id, photos } => {
            albums.add_assets(&album_id, &photos).await?;
            println!("Added {} photo(s) to {album_id}.", photos.len());
        }

        AlbumsAction::RemovePhotos { album_id, photos } => {
            albums.remove_assets(&album_id, &photos).await?;
            println!("Removed {} photo(s) from {album_id}.", photos.len());
        }
    }
    Ok(())
}
