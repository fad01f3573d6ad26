//! Error reporting shared by every binary

/// Install the miette report handler
pub fn install_hook() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();
}

/// Exit the process with the outcome of a binary's main logic
///
/// `Ok(code)` exits with that code. Errors are rendered through miette and
/// exit with 1.
pub fn exit(result: anyhow::Result<i32>) -> ! {
    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Convert anyhow error to miette for display
            let report = miette::Report::msg(format!("{e:#}"));
            eprintln!("{report:?}");
            std::process::exit(1);
        }
    }
}
