fn main() {
    // Icon embedding only applies to Windows builds, and only when the
    // asset is present in the checkout.
    let icon = "src/assets/shelf.ico";
    let on_windows = std::env::var("CARGO_CFG_TARGET_OS")
        .map(|os| os == "windows")
        .unwrap_or(false);
    if on_windows && std::path::Path::new(icon).exists() {
        let mut res = winresource::WindowsResource::new();
        res.set_icon(icon);
        res
            .compile()
            .expect("Failed to embed Windows resources (icon)");
    }
}
