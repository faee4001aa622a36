use controller::{Level, SearchBy};
use engine::profile::SortKey;
use nom::{alt, char, delimited, tag, take_while, take_while1, tuple, IResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Statement {
    QueryUser(SearchBy),
    QueryItem(SearchBy),
    QueryRatings(SearchBy),
    Rate(SearchBy, SearchBy, Level),
    Ranking(SearchBy),
    Decades(SearchBy),
    Divisive(SearchBy),
    Eclectic(SearchBy),
    Compare(SearchBy, SearchBy),
    CompareTriple(SearchBy, SearchBy, SearchBy),
    NextUp(SearchBy, SearchBy),
    Profile(SearchBy, SortKey),
}

#[inline(always)]
fn ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ' ' || c == '-' || c == '\''
}

fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1!(input, ident)
}

fn parse_separator(input: &str) -> IResult<&str, &str> {
    delimited!(
        input,
        take_while!(|c: char| c == ' '),
        tag!(","),
        take_while!(|c: char| c == ' ')
    )
}

fn parse_searchby(input: &str) -> IResult<&str, SearchBy> {
    let (input, index_type) = alt! {
        input,
        tag!("id")   |
        tag!("name") |
        tag!("slug")
    }?;

    let (input, value) = delimited!(input, char!('('), parse_ident, char!(')'))?;

    let searchby = match index_type {
        "id" => SearchBy::id(value),
        "name" => SearchBy::name(value),
        "slug" => SearchBy::slug(value),
        _ => unreachable!(),
    };

    Ok((input, searchby))
}

fn parse_level(input: &str) -> IResult<&str, Level> {
    let (input, level) = alt! {
        input,
        tag!("loved")     |
        tag!("liked")     |
        tag!("okay")      |
        tag!("disliked")  |
        tag!("hated")     |
        tag!("not_rated")
    }?;

    let level = match level {
        "loved" => Level::Loved,
        "liked" => Level::Liked,
        "okay" => Level::Okay,
        "disliked" => Level::Disliked,
        "hated" => Level::Hated,
        "not_rated" => Level::NotRated,
        _ => unreachable!(),
    };

    Ok((input, level))
}

fn parse_sort_key(input: &str) -> IResult<&str, SortKey> {
    let (input, key) = alt! {
        input,
        tag!("title")      |
        tag!("year")       |
        tag!("director")   |
        tag!("genre")      |
        tag!("rating")     |
        tag!("popularity")
    }?;

    let key = match key {
        "title" => SortKey::Title,
        "year" => SortKey::Year,
        "director" => SortKey::Director,
        "genre" => SortKey::Genre,
        "rating" => SortKey::RatingLevel,
        "popularity" => SortKey::Popularity,
        _ => unreachable!(),
    };

    Ok((input, key))
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    let (input, statement_type) = alt! {
        input,
        tag!("query_user")    |
        tag!("query_item")    |
        tag!("query_ratings") |
        tag!("ranking")       |
        tag!("rate")          |
        tag!("decades")       |
        tag!("divisive")      |
        tag!("eclectic")      |
        tag!("compare3")      |
        tag!("compare")       |
        tag!("next")          |
        tag!("profile")
    }?;

    let (input, statement) = match statement_type {
        "query_user" => {
            let (input, searchby) = delimited!(input, char!('('), parse_searchby, char!(')'))?;
            (input, Statement::QueryUser(searchby))
        }

        "query_item" => {
            let (input, searchby) = delimited!(input, char!('('), parse_searchby, char!(')'))?;
            (input, Statement::QueryItem(searchby))
        }

        "query_ratings" => {
            let (input, searchby) = delimited!(input, char!('('), parse_searchby, char!(')'))?;
            (input, Statement::QueryRatings(searchby))
        }

        "rate" => {
            let (input, (user, _, item, _, level)) = delimited!(
                input,
                char!('('),
                tuple!(
                    parse_searchby,
                    parse_separator,
                    parse_searchby,
                    parse_separator,
                    parse_level
                ),
                char!(')')
            )?;

            (input, Statement::Rate(user, item, level))
        }

        "ranking" => {
            let (input, searchby) = delimited!(input, char!('('), parse_searchby, char!(')'))?;
            (input, Statement::Ranking(searchby))
        }

        "decades" => {
            let (input, searchby) = delimited!(input, char!('('), parse_searchby, char!(')'))?;
            (input, Statement::Decades(searchby))
        }

        "divisive" => {
            let (input, searchby) = delimited!(input, char!('('), parse_searchby, char!(')'))?;
            (input, Statement::Divisive(searchby))
        }

        "eclectic" => {
            let (input, searchby) = delimited!(input, char!('('), parse_searchby, char!(')'))?;
            (input, Statement::Eclectic(searchby))
        }

        "compare3" => {
            let (input, (user_a, _, user_b, _, user_c)) = delimited!(
                input,
                char!('('),
                tuple!(
                    parse_searchby,
                    parse_separator,
                    parse_searchby,
                    parse_separator,
                    parse_searchby
                ),
                char!(')')
            )?;

            (input, Statement::CompareTriple(user_a, user_b, user_c))
        }

        "compare" => {
            let (input, (user_a, _, user_b)) = delimited!(
                input,
                char!('('),
                tuple!(parse_searchby, parse_separator, parse_searchby),
                char!(')')
            )?;

            (input, Statement::Compare(user_a, user_b))
        }

        "next" => {
            let (input, (user, _, category)) = delimited!(
                input,
                char!('('),
                tuple!(parse_searchby, parse_separator, parse_searchby),
                char!(')')
            )?;

            (input, Statement::NextUp(user, category))
        }

        "profile" => {
            let (input, (user, _, key)) = delimited!(
                input,
                char!('('),
                tuple!(parse_searchby, parse_separator, parse_sort_key),
                char!(')')
            )?;

            (input, Statement::Profile(user, key))
        }

        _ => unreachable!(),
    };

    Ok((input, statement))
}

pub fn parse_line(input: &str) -> Option<Statement> {
    let input = input.trim();
    let (rest, statement) = parse_statement(input).ok()?;

    if rest.is_empty() {
        Some(statement)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchby_tests() {
        let parsed = parse_searchby("id(323)");
        let expected = ("", SearchBy::id("323"));

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_searchby("name(Patrick C)");
        let expected = ("", SearchBy::name("Patrick C"));

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_searchby("slug(movie-night)");
        let expected = ("", SearchBy::slug("movie-night"));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn query_user_statement() {
        let parsed = parse_statement("query_user(id(3))");
        let expected = ("", Statement::QueryUser(SearchBy::id("3")));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn rate_statement() {
        let parsed = parse_statement("rate(id(3), name(Alien), loved)");
        let expected = (
            "",
            Statement::Rate(SearchBy::id("3"), SearchBy::name("Alien"), Level::Loved),
        );

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn ranking_statement() {
        let parsed = parse_statement("ranking(slug(movies))");
        let expected = ("", Statement::Ranking(SearchBy::slug("movies")));

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn compare_statements() {
        let parsed = parse_statement("compare(id(1), id(2))");
        let expected = (
            "",
            Statement::Compare(SearchBy::id("1"), SearchBy::id("2")),
        );

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_statement("compare3(id(1), id(2), name(Ann))");
        let expected = (
            "",
            Statement::CompareTriple(SearchBy::id("1"), SearchBy::id("2"), SearchBy::name("Ann")),
        );

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn profile_statement() {
        let parsed = parse_statement("profile(name(Ann), popularity)");
        let expected = (
            "",
            Statement::Profile(SearchBy::name("Ann"), SortKey::Popularity),
        );

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn next_statement() {
        let parsed = parse_statement("next(id(3), slug(movies))");
        let expected = (
            "",
            Statement::NextUp(SearchBy::id("3"), SearchBy::slug("movies")),
        );

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn parse_invalid_line() {
        assert!(parse_line("query_user(id())").is_none());
        assert!(parse_line("rate(id(1), id(2), amazing)").is_none());
    }

    #[test]
    fn parse_valid_line() {
        let parsed = parse_line("eclectic(slug(movies))  ");
        assert_eq!(parsed, Some(Statement::Eclectic(SearchBy::slug("movies"))));
    }
}
