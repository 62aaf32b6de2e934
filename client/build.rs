use std::{env, fs};

const PROTO: &str = "../proto/sentiment.proto";

fn ensure_protoc() -> Result<(), Box<dyn std::error::Error>> {
    if env::var_os("PROTOC").is_none() {
        env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={PROTO}");
    ensure_protoc()?;
    fs::create_dir_all("src/pb")?;

    // Client stub only.
    tonic_build::configure()
        .build_server(false)
        .out_dir("src/pb")
        .include_file("mod.rs")
        .compile(&[PROTO], &["../proto"])?;

    Ok(())
}
