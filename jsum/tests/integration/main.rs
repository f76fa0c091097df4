mod classes;
mod collections;
mod enums;
mod optionals;
mod registry;
mod strategies;
mod synthesis;
mod transforms;
mod tuples;
