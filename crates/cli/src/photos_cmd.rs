use anyhow::Result;

use picfolio_core::DateGroup;

use crate::bound_client;

pub async fn run(user: Option<String>, pages: u32, search: Option<String>) -> Result<()> {
    let client = bound_client(user).await?;
    let feed = client.feed();

    // Page zero is loaded by bootstrap; fetch the rest on demand.
    for _ in 1..pages {
        if feed.cursor().exhausted {
            break;
        }
        feed.load_more().await?;
    }

    let groups = match &search {
        Some(query) => feed.matching(query),
        None => feed.groups(),
    };
    if groups.is_empty() {
        println!("No photos.");
        return Ok(());
    }

    print_groups(&groups, &client);
    let cursor = feed.cursor();
    if cursor.exhausted {
        println!("(end of feed)");
    } else {
        println!("(more available: next page {})", cursor.next_page_index);
    }
    Ok(())
}

pub fn print_groups(groups: &[DateGroup], client: &picfolio_sync::GalleryClient) {
    for group in groups {
        println!("{}", group.key);
        for photo in &group.photos {
            let fav = if client.favorites().is_favorite(&photo.id) {
                "*"
            } else {
                " "
            };
            let kind = match photo.duration_seconds {
                Some(secs) => format!("video {secs:.0}s"),
                None => "photo".to_string(),
            };
            println!("  {fav} {}  ({kind})", photo.id);
        }
    }
}
