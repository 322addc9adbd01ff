use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};
use thaw::ssr::SSRMountStyleProvider;
use thaw::*;

use crate::api::BookingsClient;
use crate::components::Navbar;
use crate::config::ClientConfig;
use crate::store::BookingStore;
use crate::views::{DoctorProfile, HomePage, MyBookings, NotFoundPage, ProviderBookings};

/// Everything the pages share: configuration, the backend client and the
/// booking store.
#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub api: Arc<BookingsClient>,
    pub store: RwSignal<BookingStore>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        let api = Arc::new(BookingsClient::from_config(&config));
        Self {
            config,
            api,
            store: RwSignal::new(BookingStore::default()),
        }
    }
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <SSRMountStyleProvider>
            <!DOCTYPE html>
            <html lang="en">
                <head>
                    <meta charset="utf-8"/>
                    <meta name="viewport" content="width=device-width, initial-scale=1"/>
                    <AutoReload options=options.clone() />
                    <HydrationScripts options/>
                    <MetaTags/>
                </head>
                <body>
                    <App/>
                </body>
            </html>
        </SSRMountStyleProvider>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(AppContext::new(ClientConfig::load()));

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/booking-web.css"/>

        <Title text="Clinic Booking"/>

        <ConfigProvider>
            <Router>
                <Navbar/>
                <main>
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=(StaticSegment("doctors"), ParamSegment("id")) view=DoctorProfile/>
                        <Route path=StaticSegment("bookings") view=MyBookings/>
                        <Route
                            path=(StaticSegment("provider"), ParamSegment("doctor_id"), StaticSegment("bookings"))
                            view=ProviderBookings
                        />
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}
