use feishu_api::api::{DocxApi, DriveApi};
use feishu_api::{Client, ClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Credentials come from FEISHU_APP_ID / FEISHU_APP_SECRET
    let client = Client::new(ClientConfig::from_env())?;

    let document_id = std::env::args()
        .nth(1)
        .ok_or("usage: fetch_document <document_id>")?;

    // Warm the token up front so the first real call doesn't pay for it
    client.ready().await?;

    println!("Fetching blocks of {}...", document_id);
    let blocks = client.get_page_blocks(&document_id, None).await?;
    println!("Document has {} blocks:", blocks.len());

    for block in &blocks {
        println!("  [type {}] {}", block.block_type, block.block_id);

        // Image blocks carry a media token; download the attachment
        if let Some(token) = block
            .payload
            .get("image")
            .and_then(|image| image.get("token"))
            .and_then(|token| token.as_str())
        {
            let bytes = client.get_resource_item(token).await?;
            println!("    downloaded image {} ({} bytes)", token, bytes.len());
        }
    }

    Ok(())
}
