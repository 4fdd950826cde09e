/*
 * Responsibility
 * - tokio runtime start
 * - app::run() call (no logic here)
 */
use anyhow::Result;

use desk_auth::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
