use std::{env, fs, path::Path};

fn main() {
    println!("cargo:rerun-if-changed=config.json");

    // OUT_DIR = target/<profile>/build/<crate>/out
    let Ok(out_dir) = env::var("OUT_DIR") else {
        println!("cargo:warning=OUT_DIR not set, skipping config.json copy");
        return;
    };

    // Three levels up is target/<profile>, where the binary lands.
    let Some(exe_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        println!("cargo:warning=Cannot locate target directory for config.json");
        return;
    };

    let dst = exe_dir.join("config.json");
    if let Err(e) = fs::copy("config.json", &dst) {
        println!("cargo:warning=Could not copy config.json: {}", e);
    }
}
