pub mod current_subject;
