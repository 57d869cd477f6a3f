mod helpers;
mod lists;
mod misc;
