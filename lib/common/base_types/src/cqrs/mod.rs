pub mod cqrs_types;
