//! different utility modules used throughout the project
/// tiny module to save the error ledger into csv or text file and to set up logging
pub mod logger;
/// tiny module to plot Euler approximation against the reference solution
pub mod plots;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
///
mod task_parser_tests;
