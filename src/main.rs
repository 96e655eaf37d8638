#[cfg(feature = "csr")]
fn main() {
    use blog_admin::app::App;
    use blog_admin::config::ApiConfig;

    console_error_panic_hook::set_once();
    blog_admin::telemetry::init();

    let config = ApiConfig::from_build_env();
    if let Err(e) = config.validate() {
        tracing::warn!("{e}");
    }
    tracing::info!(base_url = %config.base_url, "Starting blog admin");

    leptos::mount::mount_to_body(move || leptos::view! { <App config=config /> });
}

// The admin UI only runs in the browser; build the bundle with `--features csr`.
#[cfg(not(feature = "csr"))]
fn main() {}
