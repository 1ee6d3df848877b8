#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // res/storevisit.ico must exist
    let mut res = WindowsResource::new();
    res.set_icon("res/storevisit.ico")
        .set("FileDescription", "storevisit CLI")
        .set("ProductName", "storevisit")
        .set("OriginalFilename", "storevisit.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
