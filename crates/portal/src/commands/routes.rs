//! Route table command.

use anyhow::Result;
use portal_pages::RouteTable;

/// Print every mounted path with the view it renders.
pub fn run() -> Result<()> {
    let table = RouteTable::portal()?;

    for path in table.paths() {
        let (Some(view), Some(page)) = (table.view_for(path), table.resolve(path)) else {
            continue;
        };

        let access = if page.is_public() { "public" } else { "private" };
        println!("{:<20} {:<16} {}", path, view.id(), access);
    }

    tracing::info!("{} routes", table.len());

    Ok(())
}
