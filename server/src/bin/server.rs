//! QR code generator server binary.

use tracing_subscriber::EnvFilter;

use qr_generator_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting QR code generator");

    let state = qr_generator_lib::init_foundation()?;

    let server_state = state.clone();
    let mut server_handle = tokio::spawn(async move { server::start_server(server_state).await });

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res?;
            tracing::info!("Shutting down...");
            state.shutdown_token().cancel();
            server_handle.await??;
        }
        res = &mut server_handle => res??,
    }

    Ok(())
}
