use std::{env, process::ExitCode};
use zonedata::TzifV1;

macro_rules! format_line(
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr) => {
        println!("{:<20} {:<14} {:<16} {:<10} {}", $a, $b, $c, $d, $e)
    };
    ($a:expr, $b:expr, $c:expr) => {
        println!("{:<20} {:<14} {}", $a, $b, $c)
    };
    ($a:expr, $b:expr) => {
        println!("{:<20} {}", $a, $b)
    };
);

fn main() -> ExitCode {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: tzif-inspect <path to TZif file>");
        return ExitCode::FAILURE;
    };
    let tzif = match TzifV1::from_path(&path) {
        Ok(tzif) => tzif,
        Err(err) => {
            eprintln!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let header = tzif.header();
    format_line!("version", header.version_number());
    format_line!("isutcnt", header.isutcnt);
    format_line!("isstdcnt", header.isstdcnt);
    format_line!("leapcnt", header.leapcnt);
    format_line!("timecnt", header.timecnt);
    format_line!("typecnt", header.typecnt);
    format_line!("charcnt", header.charcnt);

    println!();

    format_line!("Index", "Transition", "Local type", "Offset", "DST");
    for (index, (row, type_index)) in tzif.rows().zip(tzif.transition_types()).enumerate() {
        format_line!(
            format!("transition[{index}]"),
            row.timestamp,
            format!("{type_index} ({})", String::from_utf8_lossy(row.designation)),
            row.ut_offset,
            row.is_dst
        );
    }

    println!();

    for (index, local_type) in tzif.local_time_types().iter().enumerate() {
        println!("local_type[{index}]");
        println!("{local_type:#?}");
        match tzif.designation(local_type) {
            Some(designation) => {
                println!("designation: {}\n", String::from_utf8_lossy(designation))
            }
            None => println!("designation: unresolved\n"),
        }
    }

    for (index, leap) in tzif.leap_seconds().iter().enumerate() {
        format_line!(
            format!("leap_second[{index}]"),
            leap.occurrence,
            leap.correction
        );
    }

    ExitCode::SUCCESS
}
