// SPDX-License-Identifier: GPL-3.0-only

use check_filer::Report;
use filer_types::Severity;

pub fn assert_status(report: &Report, status: Severity) {
    assert_eq!(
        report.status,
        status,
        "unexpected status for line: {}",
        report.render()
    );
    assert_eq!(report.exit_code, status.exit_code());
}

pub fn assert_single_line(report: &Report) {
    let line = report.render();
    assert!(!line.contains('\n'), "plugin output must be one line: {line:?}");
}
