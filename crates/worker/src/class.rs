/// Execution classes used to label spawned work for scheduling and tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Blocking partition decode work; runs on the blocking pool.
	Decode,
	/// One fan-out/merge/publish load cycle.
	LoadCycle,
	/// Long-lived drivers that consume trigger channels.
	Driver,
}

impl TaskClass {
	/// Stable label used in trace fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Decode => "decode",
			Self::LoadCycle => "load_cycle",
			Self::Driver => "driver",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn labels_are_distinct() {
		let labels = [TaskClass::Decode, TaskClass::LoadCycle, TaskClass::Driver].map(TaskClass::as_str);
		for (i, a) in labels.iter().enumerate() {
			for b in &labels[i + 1..] {
				assert_ne!(a, b);
			}
		}
	}
}
