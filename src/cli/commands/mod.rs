pub mod plan;
pub mod run;

use crate::types::Coord;

/// Parse an "x,y" coordinate argument.
pub(crate) fn parse_coord(raw: &str) -> Result<Coord, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("invalid coordinate '{raw}' (expected 'x,y')"))?;
    let parse = |part: &str, axis: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid {axis} coordinate in '{raw}'"))
    };
    Ok(Coord::new(parse(x, "x")?, parse(y, "y")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates() {
        assert_eq!(parse_coord("7,8").unwrap(), Coord::new(7, 8));
        assert_eq!(parse_coord(" 3 , 5 ").unwrap(), Coord::new(3, 5));
        assert!(parse_coord("7").is_err());
        assert!(parse_coord("a,b").is_err());
        assert!(parse_coord("-1,0").is_err());
    }
}
