pub mod completion_form;
pub mod member_draft;
pub mod validation;
