mod helpers;

mod lifecycle;
mod navigation;
mod persistence;
mod rendering;
