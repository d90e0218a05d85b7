pub mod logs_dialog;
