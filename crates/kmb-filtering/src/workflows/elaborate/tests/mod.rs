mod common;
mod ltv;
mod scheme;
