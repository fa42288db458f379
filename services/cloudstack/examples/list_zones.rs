use anyhow::Result;
use cloudstack_sign::{Command, Config};
use cloudstack_sign_core::{Context, OsEnv};
use http::Method;

fn main() -> Result<()> {
    // Initialize logging for debugging
    let _ = env_logger::builder().is_test(true).try_init();

    // Read CLOUDSTACK_* variables for every field not set here.
    let ctx = Context::new().with_env(OsEnv);
    let config = Config::new().from_env(&ctx)?;

    let config = if config.api_key.is_none() || config.host.is_none() {
        println!("No CloudStack configuration found, using demo values for example");
        config
            .with_api_key("demo-api-key")
            .with_secret_key("demo-secret-key")
            .with_host("cloud.example.com")
    } else {
        config
    };
    let signer = config.build()?;

    // Example 1: GET, the signed parameters travel in the query.
    let cmd = Command::new("listZones").with_param("available", true);
    let signed = signer.sign_command(&cmd)?;
    println!("Canonical query: {}", signed.body().canonical_query());
    println!("GET {}", signed.uri());

    // Example 2: POST, the signed parameters travel in the body.
    let cmd = Command::new("deployVirtualMachine")
        .with_param("zoneId", "a1b2")
        .with_param("displayName", "my vm")
        .with_method(Method::POST);
    let req = signer.sign_command(&cmd)?.into_request()?;
    println!("{} {}", req.method(), req.uri());
    println!("{}", String::from_utf8_lossy(req.body()));

    Ok(())
}
