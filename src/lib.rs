pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod notifier;
    }
}

pub mod modules {
    pub mod event_registrations {
        pub mod core {
            pub mod events;
            pub mod evolve;
            pub mod model;
            pub mod ports;
            pub mod state;
            pub mod validation;
        }
        pub mod use_cases {
            pub mod detach;
            pub mod flow_error;
            pub mod register_for_event {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod pay_for_registration {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_registrations {
                pub mod inbound {
                    pub mod http;
                }
                pub mod queries_port;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod dialogs_in_memory;
                pub mod registrations_in_memory;
                pub mod simulated_gateways;
            }
        }
    }
}

pub mod shell;
