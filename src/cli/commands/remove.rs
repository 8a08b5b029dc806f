use crate::config::Config;
use crate::db::Store;
use uuid::Uuid;

pub async fn cmd_remove_subject(config: &Config, id: Uuid, yes: bool) -> anyhow::Result<()> {
    let store = Store::open(&config.general).await?;

    let Some(subject) = store.get_subject(id).await? else {
        println!("Subject {id} not found.");
        println!("Use 'noshiro list' to see subject IDs.");
        return Ok(());
    };

    if !yes {
        println!("Remove {subject} and all of its credits, status and schedule?");
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if store.delete_subject(id).await? {
        println!("✓ Removed: {subject}");
    } else {
        println!("Failed to remove subject.");
    }

    Ok(())
}
