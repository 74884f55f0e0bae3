use std::path::Path;

use anyhow::{bail, Context, Result};
use eps_codesign::{pipeline, preflight};

fn usage() -> &'static str {
    "Usage:\n  eps-codesign <certificate> <artifact> <outputname>\n\n  certificate  name of the developer certificate to sign with\n  artifact     build artifact to be signed (a .zip-named tar wrapper)\n  outputname   name of the disk image to create (without extension)"
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let [certificate, artifact, output_name] = args.as_slice() else {
        bail!(usage());
    };

    preflight::check_host_tools()?;

    let staging = std::env::current_dir().context("resolving current directory")?;
    let image = pipeline::run(certificate, Path::new(artifact), output_name, &staging)?;

    println!("[done] signed image at {}", image.display());
    Ok(())
}
