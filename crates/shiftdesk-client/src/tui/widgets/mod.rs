pub mod banner;
pub mod detail_panel;
pub mod help_popup;
pub mod shift_list;
pub mod shift_row;
pub mod status_bar;
