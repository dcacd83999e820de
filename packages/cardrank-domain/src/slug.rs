/// Document id for a card name: lower-cased, runs of anything outside `[a-z0-9]` collapsed
/// to `-`, edge dashes stripped. Names with no usable characters map to `card`.
pub fn slugify(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	let mut pending_dash = false;

	for ch in name.trim().to_lowercase().chars() {
		if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
			if pending_dash && !out.is_empty() {
				out.push('-');
			}

			pending_dash = false;

			out.push(ch);
		} else {
			pending_dash = true;
		}
	}

	if out.is_empty() { "card".to_string() } else { out }
}

/// First id in `base`, `base-2`, `base-3`, ... for which `taken` returns false.
pub fn unique_slug(base: &str, mut taken: impl FnMut(&str) -> bool) -> String {
	if !taken(base) {
		return base.to_string();
	}

	let mut suffix = 2_u32;

	loop {
		let candidate = format!("{base}-{suffix}");

		if !taken(&candidate) {
			return candidate;
		}

		suffix += 1;
	}
}
