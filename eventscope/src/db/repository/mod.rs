mod events;

pub use events::EventRepository;
