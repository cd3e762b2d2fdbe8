//! Integer alpha compositing of 8-bit channels.

/// Composites straight-alpha `src` over straight-alpha `dst`.
#[inline]
pub(crate) fn source_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let src_a = src[3] as u32;
    if src_a == 255 {
        return src;
    }
    if src_a == 0 {
        return dst;
    }
    // dst_a * (255 - src_a) / 255, scaled by 255 to keep precision
    let dst_weight = dst[3] as u32 * (255 - src_a);
    let out_a = src_a * 255 + dst_weight;
    let mut res = [0u8; 4];
    for i in 0..3 {
        let c = src[i] as u32 * src_a * 255 + dst[i] as u32 * dst_weight;
        res[i] = ((c + out_a / 2) / out_a).min(255) as u8;
    }
    res[3] = ((out_a + 127) / 255) as u8;
    res
}
