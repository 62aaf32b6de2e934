use anyhow::Result;
use clap::Parser;
use sa_server::{pb, PlaceholderModel};
use tonic::transport::Server;

#[derive(Parser, Debug)]
struct Args {
    #[clap(short, long, default_value = "8089")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    tracing::info!("Starting sentiment analysis server with Args={:?}", args);

    let addr = format!("[::]:{}", args.port).parse()?;

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(pb::FILE_DESCRIPTOR_SET)
        .build()?;

    Server::builder()
        .add_service(PlaceholderModel.into_service())
        .add_service(reflection_service)
        .serve_with_shutdown(addr, sa_server::shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    tracing::info!("Server shutdown");
    Ok(())
}
