pub mod lexicon_summary;
pub mod practice_card;
pub mod session_bar;
