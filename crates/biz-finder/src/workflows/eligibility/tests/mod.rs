mod common;
mod documents;
mod intake;
mod routing;
