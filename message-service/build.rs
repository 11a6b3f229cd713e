use std::env::var;
use std::io::Result;

fn main() -> Result<()> {
    let proto_files = &["proto/message.proto"];
    let proto_folder = "proto";

    let out_dir = var("OUT_DIR").expect("Missing OUT_DIR environment variable");
    let descriptors_path = format!("{}/descriptors.bin", out_dir);

    println!("cargo:rerun-if-changed=proto/message.proto");

    // The descriptor set is embedded so the gateway and the proto-JSON
    // renderer can resolve messages at runtime.
    tonic_prost_build::configure()
        .file_descriptor_set_path(descriptors_path)
        .compile_protos(proto_files, &[proto_folder])?;

    Ok(())
}
