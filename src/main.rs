use segseq::{Atomic, Cursor, Result, SegmentChain, Sequence};
use smallvec::SmallVec;
use tracing_subscriber::EnvFilter;

/// Outputs up to this many elements are kept on the stack
const MAX_STACK_LEN: usize = 32;

type Output<T> = SmallVec<[T; MAX_STACK_LEN]>;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let one = [0, 1, 2, 3, 4];
    let two = [5, 6, 7, 8, 9];
    let three = [10, 11, 12, 13, 14];

    let mut chain = SegmentChain::new_head(&one[..]);
    let second = chain.append(chain.head(), &two)?;
    let last = chain.append(second, &three)?;

    let sequence = Sequence::new(&chain, chain.head(), 0, last, three.len())?;
    tracing::info!(
        len = sequence.len(),
        segments = chain.segment_count(),
        "built sequence"
    );

    let drained = drain_after(sequence.cursor(), 6);
    print_values("drained after 6", &drained);

    if let Some(copied) = copy_after(sequence, 6)? {
        print_values("copied after 6", &copied);
    }

    let mut missing = sequence.cursor();
    if !missing.try_advance_to(99, false) {
        tracing::info!(
            at_end = missing.at_end(),
            "value 99 not found, cursor exhausted"
        );
    }

    Ok(())
}

/// Seek `target`, then read the rest one element at a time
fn drain_after<C: Cursor>(mut cursor: C, target: C::Element) -> Output<C::Element> {
    let mut output = Output::new();
    if cursor.try_advance_to(target, false) {
        while let Some(value) = cursor.try_read() {
            output.push(value);
        }
    }
    output
}

/// Seek `target`, then copy the unread tail out in one go
fn copy_after<T>(sequence: Sequence<'_, T>, target: T) -> Result<Option<Output<T>>>
where
    T: Atomic + Default,
{
    let mut cursor = sequence.cursor();
    if !cursor.try_advance_to(target, false) {
        return Ok(None);
    }

    let remaining = cursor.remaining();
    let mut output: Output<T> = SmallVec::from_elem(T::default(), remaining.len());
    remaining.copy_to(&mut output)?;
    tracing::debug!(
        len = output.len(),
        on_heap = output.spilled(),
        "copied remaining elements"
    );
    Ok(Some(output))
}

fn print_values<T: Atomic>(label: &str, values: &[T]) {
    println!("{label}:");
    for value in values {
        println!("{value:?}");
    }
}
