mod common;
mod localization;
