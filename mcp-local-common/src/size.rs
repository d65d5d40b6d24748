//! Human readable byte counts

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Format a size as `N bytes`, `N.N KB`, or `N.N MB`
pub fn format_file_size(size: u64) -> String {
    if size < KB {
        format!("{size} bytes")
    } else if size < MB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{:.1} MB", size as f64 / MB as f64)
    }
}

/// Compact variant used in file listings: `N B`, `N.N KB`, `N.N MB`, `N.N GB`
pub fn format_file_size_short(size: u64) -> String {
    if size < KB {
        format!("{size} B")
    } else if size < MB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else {
        format!("{:.1} GB", size as f64 / GB as f64)
    }
}
