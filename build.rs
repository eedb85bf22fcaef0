use std::{env, fs, path::PathBuf};

const LINK_FILES: [&str; 2] = ["src/bsp/xmcu/link.ld", "src/bsp/xmcu/handlers.ld"];

fn main() {
    let linker_file = env::var("LINKER_FILE").unwrap_or_default();

    println!("cargo:rerun-if-changed={}", linker_file);
    for file in LINK_FILES {
        println!("cargo:rerun-if-changed={}", file);
    }
    println!("cargo:rerun-if-changed=build.rs");

    // Only the bare-metal link needs the scripts.
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "none" {
        return;
    }

    let out = PathBuf::from(env::var("OUT_DIR").unwrap());
    for file in LINK_FILES {
        let path = PathBuf::from(file);
        fs::copy(&path, out.join(path.file_name().unwrap())).unwrap();
    }
    println!("cargo:rustc-link-search={}", out.display());

    // A board-specific script handed in through LINKER_FILE takes precedence.
    if linker_file.is_empty() {
        println!("cargo:rustc-link-arg-bins=-Tlink.ld");
    } else {
        println!("cargo:rustc-link-arg-bins=-T{}", linker_file);
    }
}
