pub mod app;
pub mod config;
pub mod error;
pub mod listing;
pub mod navigation;
pub mod models {
    pub mod blog;
    pub mod normalize;
    pub mod slug;
}
pub mod form {
    pub mod actions;
    pub mod payload;
    pub mod state;
    pub mod validation;
}
pub mod api {
    pub mod client;
    pub mod errors;
}
pub mod components {
    pub mod blog_form;
    pub mod blog_list;
}

#[cfg(feature = "csr")]
pub mod browser;
#[cfg(feature = "csr")]
pub mod telemetry;
