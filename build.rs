use std::env;

fn main() {

    // The `sdl` feature links against the SDL2 C libraries.
    // Assume libsdl2-dev is installed with the package manager on unix family systems.
    // On a windows OS we look for the C built sdl2 libraries in ./sdl_libs, or SDL_LIBS_DIR.
    let sdl_enabled = env::var("CARGO_FEATURE_SDL").is_ok();

    if sdl_enabled && cfg!(target_family = "windows") {

        let libs_dir =
            if let Ok(dir) = env::var("SDL_LIBS_DIR") {
                Some(dir)
            }
            else if let Ok(cargo_root_dir) = env::var("CARGO_MANIFEST_DIR") {
                Some(format!("{}/sdl_libs", cargo_root_dir))
            }
            else {
                None
            };

        if let Some(libs) = libs_dir {
            println!("cargo:rustc-link-search=native={}", libs);
        }
    }
}
