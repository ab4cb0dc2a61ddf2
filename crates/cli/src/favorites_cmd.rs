use anyhow::Result;

use crate::{bound_client, FavoritesAction};

pub async fn run(user: Option<String>, action: FavoritesAction) -> Result<()> {
    let client = bound_client(user).await?;
    let favorites = client.favorites();

    match action {
        FavoritesAction::List => {
            let ids = favorites.ids();
            if ids.is_empty() {
                println!("No favorite photos yet.");
            } else {
                for id in ids {
                    println!("{id}");
                }
            }
        }
        FavoritesAction::Toggle { photo_id } => {
            let now_favorite = favorites.toggle(&photo_id).await?;
            if now_favorite {
                println!("Favorited {photo_id}.");
            } else {
                println!("Unfavorited {photo_id}.");
            }
        }
    }
    Ok(())
}
