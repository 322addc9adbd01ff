pub mod doctor_profile;
pub mod home;
pub mod my_bookings;
pub mod not_found;
pub mod provider_bookings;

pub use doctor_profile::DoctorProfile;
pub use home::HomePage;
pub use my_bookings::MyBookings;
pub use not_found::NotFoundPage;
pub use provider_bookings::ProviderBookings;
