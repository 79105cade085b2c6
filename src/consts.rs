pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains the configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity log.
    pub const MAX_ACTIVITY_LOGS: usize = 50;

    /// Buffer size of the channel carrying loader events to the UI.
    pub const EVENT_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // DATA SOURCE CONFIGURATION
    // =============================================================================

    /// Data source defaults used when no config file overrides them.
    pub mod source {
        use std::time::Duration;

        /// Public GraphQL endpoint serving the collection statistics.
        pub const DEFAULT_ENDPOINT: &str =
            "https://api.ghostlogs.xyz/gg/pub/99727ea0-a98b-494c-ae7d-0cc2ae12333b/ghostgraph";

        /// Public read key sent in the `X-GHOST-KEY` header.
        pub const DEFAULT_API_KEY: &str = "3qt9k7e7ejw831m98qgvjs";

        /// Header carrying the API key.
        pub const API_KEY_HEADER: &str = "X-GHOST-KEY";

        /// Number of holders requested from the endpoint.
        pub const DEFAULT_HOLDER_LIMIT: u32 = 20;

        /// Placeholder substituted with the holder limit in the query template.
        pub const HOLDER_LIMIT_PLACEHOLDER: &str = "{holder_limit}";

        /// Query requesting the three result sets the dashboard renders.
        pub const DEFAULT_QUERY_TEMPLATE: &str = r#"query ChonkieStats {
  dailyChonkTransfers {
    items {
      id
      totalTransfers
    }
  }
  topChonkHolders(orderBy: "totalChonks", orderDirection: "desc", limit: {holder_limit}) {
    items {
      id
      totalChonks
    }
  }
  dailyChonkTraitTransfers {
    items {
      id
      totalTraitsTransfers
    }
  }
}"#;

        /// Connect timeout for the HTTP client (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout for the HTTP client (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 20;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // LAYOUT CONFIGURATION
    // =============================================================================

    /// Responsive layout thresholds and per-layout chart settings
    pub mod layout {
        /// Viewports narrower than this (logical pixels) use the compact layout.
        pub const COMPACT_BREAKPOINT_PX: u32 = 768;

        /// Logical pixels per terminal column when the terminal does not report its pixel size.
        pub const FALLBACK_CELL_WIDTH_PX: u32 = 8;

        pub const COMPACT_ASPECT_RATIO: f64 = 1.0;
        pub const WIDE_ASPECT_RATIO: f64 = 1.75;

        pub const COMPACT_MAX_TICKS: usize = 6;
        pub const WIDE_MAX_TICKS: usize = 10;

        pub const COMPACT_LEGEND_PADDING: u16 = 10;
        pub const WIDE_LEGEND_PADDING: u16 = 20;

        /// UI refresh interval while waiting for input (milliseconds)
        pub const TICK_MS: u64 = 100;
    }

    // =============================================================================
    // SLIDER CONFIGURATION
    // =============================================================================

    /// Date range slider steps, in percent of the full timeline
    pub mod slider {
        pub const SMALL_STEP: f64 = 1.0;
        pub const LARGE_STEP: f64 = 10.0;
    }
}
