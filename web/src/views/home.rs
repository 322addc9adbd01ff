use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use thaw::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let navigate = use_navigate();
    let listing_id = RwSignal::new(String::new());

    let open_profile = move || {
        let id = listing_id.get_untracked();
        let id = id.trim();
        if !id.is_empty() {
            navigate(&format!("/doctors/{}", urlencoding::encode(id)), Default::default());
        }
    };

    view! {
        <div class="homepage-container">
            <div class="homepage-hero">
                <h1>"Book a consultation"</h1>
                <p class="homepage-subtitle">
                    "Pick a day, choose a free slot, and confirm in under a minute."
                </p>
            </div>

            <form class="homepage-lookup" on:submit=move |ev| {
                ev.prevent_default();
                open_profile();
            }>
                <Input placeholder="Doctor listing id" value=listing_id />
                <Button button_type=ButtonType::Submit appearance=ButtonAppearance::Primary>
                    "View availability"
                </Button>
            </form>

            <div class="homepage-links">
                <A href="/bookings" attr:class="btn-outlined">"My bookings"</A>
            </div>
        </div>
    }
}
