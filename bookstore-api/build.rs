//! Build script for bookstore-api crate.
//!
//! The generated code is checked in under `src/proto`. Enable the `codegen`
//! feature to regenerate it from `proto/bookstore.proto` (requires `protoc`).

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    #[cfg(feature = "codegen")]
    codegen::generate()?;

    Ok(())
}

#[cfg(feature = "codegen")]
mod codegen {
    const PROTO_PATH: &str = "proto/bookstore.proto";

    pub fn generate() -> Result<(), Box<dyn std::error::Error>> {
        println!("cargo:rerun-if-changed={PROTO_PATH}");

        // Also writes `google.protobuf.rs`, the crate's own well-known types.
        tonic_prost_build::configure()
            .build_server(true)
            .build_client(false)
            .compile_well_known_types(true)
            .server_mod_attribute("bookstore", r#"#[cfg(feature = "server")]"#)
            .out_dir("src/proto")
            .compile_protos(&[PROTO_PATH], &["proto"])?;

        Ok(())
    }
}
