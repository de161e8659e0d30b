pub mod chat;
pub mod listings;
pub mod ocr;
pub mod offers;
pub mod vaultre;
