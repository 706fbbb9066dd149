pub mod landing;
pub mod metrics;
pub mod panels;

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        assert_eq!(super::landing::GET_PAGE_CONTENT, "get_page_content");
        assert_eq!(super::metrics::GET_MEMBER_METRICS, "get_member_metrics");
        assert_eq!(super::panels::GET_FILTER_CONTROLS, "get_filter_controls");
        assert_eq!(super::panels::GET_PANEL_DATA, "get_panel_data");
        assert_eq!(super::panels::POST_PANEL_EDITS, "post_panel_edits");
        assert_eq!(super::panels::POST_UNPIVOT, "post_unpivot");
    }
}
