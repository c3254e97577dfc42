//! CSV Reader Examples
//!
//! Demonstrates the reader on a small generated file:
//! - Reading record by record
//! - Skipping a header line
//! - Custom delimiters
//! - Multi-line quoted fields
//! - Handling malformed input

use csvstream::source::LineReader;
use csvstream::{CsvError, CsvReader, ParserConfig};
use std::error::Error;
use std::io::Write;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== CSV Reader Examples ===\n");

    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "Name,Age,City")?;
    writeln!(file, "Alice,30,NYC")?;
    writeln!(file, "\"Smith, Bob\",25,\"San Francisco\nCalifornia\"")?;
    writeln!(file, "Carol,,\"said \"\"hi\"\"\"")?;
    file.flush()?;

    // Example 1: Read plain CSV
    println!("1. Reading plain CSV...");
    {
        let mut reader = CsvReader::open(file.path())?;

        for (i, record) in reader.records().enumerate() {
            println!("   Record {}: {:?}", i + 1, record?);
        }
        println!(
            "   Records: {}, physical lines: {}",
            reader.records_read(),
            reader.lines_read()
        );
    }

    // Example 2: Skip the header line
    println!("\n2. Skipping the header line...");
    {
        let config = ParserConfig::default().with_skip_lines(1);
        let mut reader = CsvReader::open_with_config(file.path(), config)?;

        while let Some(record) = reader.read_next()? {
            println!("   {} is {} years old", record[0], record[1]);
        }
    }

    // Example 3: Custom delimiter (semicolon)
    println!("\n3. Reading with custom delimiter (semicolon)...");
    {
        let data = "Country;Capital\n\"Bosnia; Herzegovina\";Sarajevo\nFrance;Paris\n";
        let source = LineReader::new(data.as_bytes());
        let mut reader = CsvReader::with_options(source, ';', '"', 0)?;

        for record in reader.read_all()? {
            println!("   {:?}", record);
        }
    }

    // Example 4: Peek before reading
    println!("\n4. Peeking at the next record...");
    {
        let mut reader = CsvReader::open(file.path())?;
        if let Some(header) = reader.peek()? {
            println!("   Columns: {:?}", header);
        }
        reader.skip(1)?;
        println!("   First data record: {:?}", reader.read_next()?);
    }

    // Example 5: Error handling
    println!("\n5. Error handling example...");
    {
        let mut reader = CsvReader::from_reader("ok,row\n\"never closed,row\n".as_bytes());
        let (records, err) = reader.read_all_partial();
        println!("   Parsed before error: {:?}", records);
        match err {
            Some(CsvError::UnterminatedQuote { line }) => {
                println!("   Expected error: quote opened on line {} was never closed", line)
            }
            Some(other) => return Err(other.into()),
            None => println!("   No error"),
        }

        match CsvReader::open("nonexistent.csv") {
            Ok(_) => println!("   File opened"),
            Err(e) => println!("   Expected error: {}", e),
        }
    }

    println!("\n=== All examples completed successfully! ===");

    Ok(())
}
