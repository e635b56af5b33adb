pub const SBOLPLOT_DISPLAY_VERSION: &str = env!("SBOLPLOT_DISPLAY_VERSION");
pub const SBOLPLOT_BUILD_N: &str = env!("SBOLPLOT_BUILD_N");

pub fn version_cli_text() -> String {
    format!(
        "sbolplot {}\nBuild {}\nSBOL Visual renderer for genetic designs",
        SBOLPLOT_DISPLAY_VERSION, SBOLPLOT_BUILD_N
    )
}
