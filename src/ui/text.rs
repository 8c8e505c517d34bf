use heapless::String;

/// Replace `dst` with as much of `src` as fits in its capacity.
///
/// Truncation happens on a character boundary. Returns `true` if
/// anything was cut off.
pub fn copy_truncated<const N: usize>(src: &str, dst: &mut String<N>) -> bool {
    dst.clear();
    for c in src.chars() {
        if dst.push(c).is_err() {
            return true;
        }
    }
    false
}
