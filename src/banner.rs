// src/banner.rs

/// Prints the CLI banner to stderr, keeping stdout for the report.
pub fn print_banner() {
    let banner = r#"
               _
  ___ ___   __| | ___  ___  ___ ___  _ __ ___
 / __/ _ \ / _` |/ _ \/ __|/ __/ _ \| '__/ _ \
| (_| (_) | (_| |  __/\__ \ (_| (_) | | |  __/
 \___\___/ \__,_|\___||___/\___\___/|_|  \___|

    Automated Code Evaluation Client
"#;
    eprintln!("{}", banner);
}
