use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar/filter.pest"]
pub struct FilterParser;
