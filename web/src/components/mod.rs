pub mod booking_calendar;
pub mod booking_card;
pub mod booking_modal;
pub mod confirmation_modal;
pub mod navbar;
pub mod status;
pub mod time_slot_picker;
pub mod toast_stack;

pub use booking_calendar::BookingCalendar;
pub use booking_card::BookingCard;
pub use booking_modal::BookingModal;
pub use confirmation_modal::ConfirmationModal;
pub use navbar::Navbar;
pub use status::{ErrorView, LoadingView};
pub use time_slot_picker::TimeSlotPicker;
pub use toast_stack::ToastStack;
