use custom_tools_mcp::{
    build_server, config::Config, domain::builtin::builtin_tools, logging,
    mcp::transport::StdioTransport,
};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let tools = builtin_tools();

    info!(
        server_name = %config.server_name,
        server_version = %config.server_version,
        protocol_version = %config.protocol_version,
        tools = tools.len(),
        "server starting"
    );

    let server = build_server(&config, tools);
    let mut transport = StdioTransport::stdio();
    server.run(&mut transport).await?;
    Ok(())
}
