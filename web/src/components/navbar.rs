use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav class="navbar">
            <div class="navbar__container">
                <div class="navbar__brand">
                    <A href="/" attr:class="navbar__logo">
                        "Clinic Booking"
                    </A>
                </div>

                <div class="navbar__links">
                    <A href="/" attr:class="navbar__link">
                        "Find a Doctor"
                    </A>
                    <A href="/bookings" attr:class="navbar__link navbar__link--cta">
                        "My Bookings"
                    </A>
                </div>
            </div>
        </nav>
    }
}
