pub mod shared {
    pub mod core {
        pub mod errors;
        pub mod pagination;
    }
    pub mod infrastructure {
        pub mod database;
        pub mod tabular;
    }
}

pub mod modules {
    pub mod funds {
        pub mod core {
            pub mod model;
        }
        pub mod use_cases {
            pub mod import_funds;
        }
        pub mod ports;
        pub mod adapters {
            pub mod inbound {
                pub mod http;
            }
            pub mod outbound {
                pub mod sqlite;
            }
        }
    }
    pub mod fund_classifications {
        pub mod core {
            pub mod model;
        }
        pub mod ports;
        pub mod adapters {
            pub mod inbound {
                pub mod http;
            }
            pub mod outbound {
                pub mod sqlite;
            }
        }
    }
    pub mod geography {
        pub mod core {
            pub mod model;
        }
        pub mod ports;
        pub mod adapters {
            pub mod inbound {
                pub mod http;
            }
            pub mod outbound {
                pub mod sqlite;
            }
        }
    }
    pub mod fund_projects {
        pub mod core {
            pub mod model;
        }
        pub mod use_cases {
            pub mod import_fund_projects;
        }
        pub mod ports;
        pub mod adapters {
            pub mod inbound {
                pub mod http;
            }
            pub mod outbound {
                pub mod sqlite;
            }
        }
    }
    pub mod commitments {
        pub mod core {
            pub mod model;
            pub mod sankey;
            pub mod series;
        }
        pub mod use_cases {
            pub mod import_commitments;
            pub mod sankey_page;
            pub mod time_series;
        }
        pub mod ports;
        pub mod adapters {
            pub mod inbound {
                pub mod http;
            }
            pub mod outbound {
                pub mod sqlite;
            }
        }
    }
    pub mod projects {
        pub mod core {
            pub mod model;
        }
        pub mod ports;
        pub mod adapters {
            pub mod inbound {
                pub mod http;
            }
            pub mod outbound {
                pub mod sqlite;
            }
        }
    }
}

pub mod shell;
