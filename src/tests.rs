//! Cross-module tests for the query builder
//!
//! These exercise whole queries end to end: rendered SQL text, derived
//! FROM lists, placeholder numbering, and bind-value resolution.

use super::*;

mod select_tests {
    use super::*;

    #[test]
    fn test_empty_select() {
        assert_eq!(SelectQuery::new(vec![]).to_sql(), "");
    }

    #[test]
    fn test_select_int_literals() {
        assert_eq!(SelectQuery::new(vec![Expr::int(123)]).to_sql(), "SELECT 123");
        assert_eq!(
            SelectQuery::new(vec![Expr::int(123), Expr::int(42)]).to_sql(),
            "SELECT 123, 42"
        );
    }

    #[test]
    fn test_select_all_arithmetic_operators() {
        let query = SelectQuery::new(vec![
            Expr::binary(Expr::int(9), BinaryOperator::Add, Expr::int(33)),
            Expr::binary(Expr::int(123), BinaryOperator::Sub, Expr::int(81)),
            Expr::binary(Expr::int(14), BinaryOperator::Mul, Expr::int(3)),
            Expr::binary(Expr::int(714), BinaryOperator::Div, Expr::int(17)),
            Expr::binary(Expr::int(1149), BinaryOperator::Mod, Expr::int(123)),
            Expr::binary(Expr::int(42), BinaryOperator::Pow, Expr::int(1)),
        ]);
        assert_eq!(
            query.to_sql(),
            "SELECT (9 + 33), (123 - 81), (14 * 3), (714 / 17), (1149 % 123), (42 ^ 1)"
        );
    }

    #[test]
    fn test_select_nested_arithmetic() {
        let query = SelectQuery::new(vec![Expr::binary(
            Expr::int(7),
            BinaryOperator::Add,
            Expr::binary(
                Expr::binary(Expr::int(1), BinaryOperator::Add, Expr::int(10)),
                BinaryOperator::Mul,
                Expr::binary(Expr::int(25), BinaryOperator::Add, Expr::int(50)),
            ),
        )]);
        assert_eq!(query.to_sql(), "SELECT (7 + ((1 + 10) * (25 + 50)))");
    }

    #[test]
    fn test_select_all_comparison_operators() {
        let query = SelectQuery::new(vec![
            Expr::comparison(Expr::int(42), ComparisonOperator::Eq, Expr::int(42)),
            Expr::comparison(Expr::int(1), ComparisonOperator::NotEq, Expr::int(2)),
            Expr::comparison(Expr::int(1), ComparisonOperator::Lt, Expr::int(2)),
            Expr::comparison(Expr::int(1), ComparisonOperator::LtEq, Expr::int(1)),
            Expr::comparison(Expr::int(2), ComparisonOperator::Gt, Expr::int(1)),
            Expr::comparison(Expr::int(2), ComparisonOperator::GtEq, Expr::int(2)),
        ]);
        assert_eq!(
            query.to_sql(),
            "SELECT (42 = 42), (1 <> 2), (1 < 2), (1 <= 1), (2 > 1), (2 >= 2)"
        );
    }

    #[test]
    fn test_select_aggregates() {
        let query = SelectQuery::new(vec![
            Expr::avg(ColumnRef::new("users", "age")),
            Expr::max(ColumnRef::new("users", "height")),
            Expr::min(ColumnRef::new("users", "height")),
            Expr::sum(ColumnRef::new("users", "score")),
        ]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT AVG("age"), MAX("height"), MIN("height"), SUM("score") FROM "users""#
        );
    }
}

mod relation_tests {
    use super::*;

    #[test]
    fn test_from_derived_from_select_list() {
        let query = SelectQuery::new(vec![
            Expr::column("users", "name"),
            Expr::column("users", "email"),
            Expr::binary(
                Expr::column("users", "height"),
                BinaryOperator::Div,
                Expr::int(100),
            ),
        ]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "name", "email", ("height" / 100) FROM "users""#
        );
    }

    #[test]
    fn test_from_multiple_relations_first_seen_order() {
        let query = SelectQuery::new(vec![
            Expr::column("users", "name"),
            Expr::column("animals", "species"),
        ]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "name", "species" FROM "users", "animals""#
        );
    }

    #[test]
    fn test_from_all_columns() {
        let query = SelectQuery::new(vec![
            Expr::all_columns("users"),
            Expr::all_columns("animals"),
        ]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "users".*, "animals".* FROM "users", "animals""#
        );
    }

    #[test]
    fn test_where_contributes_relations() {
        let query = SelectQuery::new(vec![Expr::column("users", "name")]).with_where(vec![
            Predicate::is_null(Expr::column("animals", "owner_id")),
        ]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "name" FROM "users", "animals" WHERE "owner_id" IS NULL"#
        );
    }

    #[test]
    fn test_order_by_contributes_relations() {
        let query = SelectQuery::new(vec![Expr::column("users", "name")])
            .with_order_by(vec![OrderByExpr::asc(Expr::column("animals", "weight"))]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "name" FROM "users", "animals" ORDER BY "weight" ASC"#
        );
    }
}

mod order_tests {
    use super::*;

    #[test]
    fn test_order_by_multiple_keys() {
        let query = SelectQuery::new(vec![Expr::column("users", "name")]).with_order_by(vec![
            OrderByExpr::desc(Expr::column("users", "height")),
            OrderByExpr::asc(Expr::column("users", "name")),
        ]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "name" FROM "users" ORDER BY "height" DESC, "name" ASC"#
        );
    }

    #[test]
    fn test_order_by_all_columns() {
        let query = SelectQuery::new(vec![Expr::column("users", "name")])
            .with_order_by(vec![OrderByExpr::desc(Expr::all_columns("users"))]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "name" FROM "users" ORDER BY "users".* DESC"#
        );
    }

    #[test]
    fn test_order_by_arbitrary_expression() {
        let query = SelectQuery::new(vec![Expr::column("users", "name")]).with_order_by(vec![
            OrderByExpr::desc(Expr::binary(
                Expr::int(10),
                BinaryOperator::Div,
                Expr::int(5),
            )),
        ]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "name" FROM "users" ORDER BY (10 / 5) DESC"#
        );
    }
}

mod param_tests {
    use super::*;

    #[test]
    fn test_where_params_number_left_to_right() {
        let query = SelectQuery::new(vec![Expr::column("users", "height")]).with_where(vec![
            Predicate::eq(Expr::column("users", "name"), Expr::text_param()),
            Predicate::not_eq(Expr::column("users", "city"), Expr::text_param()),
        ]);

        assert_eq!(
            query.to_sql(),
            r#"SELECT "height" FROM "users" WHERE ("name" = $1::text) AND ("city" <> $2::text)"#
        );
        assert_eq!(
            query.bindings(vec!["Alice", "Paris"]).unwrap(),
            vec![
                BindValue::String("Alice".into()),
                BindValue::String("Paris".into()),
            ]
        );
    }

    #[test]
    fn test_mixed_bound_and_free_params() {
        let query = SelectQuery::new(vec![Expr::string("Hello"), Expr::text_param()]);

        assert_eq!(query.to_sql(), "SELECT $1::text, $2::text");
        assert_eq!(
            query.bindings(vec!["Joe"]).unwrap(),
            vec![
                BindValue::String("Hello".into()),
                BindValue::String("Joe".into()),
            ]
        );
    }

    #[test]
    fn test_bound_literal_only_needs_no_inputs() {
        let query = SelectQuery::new(vec![Expr::string("Hello")]);
        assert_eq!(query.to_sql(), "SELECT $1::text");
        assert_eq!(
            query.bindings(Vec::<BindValue>::new()).unwrap(),
            vec![BindValue::String("Hello".into())]
        );
    }

    #[test]
    fn test_under_supply_is_an_error() {
        let query = SelectQuery::new(vec![Expr::text_param(), Expr::text_param()]);
        assert_eq!(
            query.bindings(vec!["only"]).unwrap_err(),
            BindError::NotEnoughValues {
                expected: 2,
                supplied: 1,
            }
        );
    }

    #[test]
    fn test_over_supply_is_an_error() {
        let query = SelectQuery::new(vec![Expr::text_param()]);
        assert_eq!(
            query.bindings(vec!["a", "b"]).unwrap_err(),
            BindError::TooManyValues {
                expected: 1,
                supplied: 2,
            }
        );
    }

    #[test]
    fn test_typed_free_param_casts() {
        let query = SelectQuery::new(vec![Expr::column("users", "name")]).with_where(vec![
            Predicate::gt_eq(
                Expr::column("users", "age"),
                Expr::param(SqlType::integer()),
            ),
        ]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "name" FROM "users" WHERE ("age" >= $1::integer)"#
        );
        assert_eq!(
            query.bindings(vec![18]).unwrap(),
            vec![BindValue::Integer(18)]
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let query = SelectQuery::new(vec![Expr::string("Hello"), Expr::text_param()])
            .with_where(vec![Predicate::eq(
                Expr::column("users", "name"),
                Expr::text_param(),
            )]);

        let first = query.to_sql();
        let second = query.to_sql();
        assert_eq!(first, second);

        let bound_first = query.bindings(vec!["Joe", "Alice"]).unwrap();
        let bound_second = query.bindings(vec!["Joe", "Alice"]).unwrap();
        assert_eq!(bound_first, bound_second);
    }
}

mod datetime_tests {
    use super::*;

    #[test]
    fn test_date_part_all_fields() {
        let cases = [
            (DateField::Century, "date_part('century', now())"),
            (DateField::Day, "date_part('day', now())"),
            (DateField::Decade, "date_part('decade', now())"),
            (DateField::DayOfWeek, "date_part('dow', now())"),
            (DateField::DayOfYear, "date_part('doy', now())"),
            (DateField::Epoch, "date_part('epoch', now())"),
            (DateField::Hour, "date_part('hour', now())"),
            (DateField::IsoDayOfWeek, "date_part('isodow', now())"),
            (DateField::IsoYear, "date_part('isoyear', now())"),
            (DateField::Microseconds, "date_part('microseconds', now())"),
            (DateField::Millennium, "date_part('millennium', now())"),
            (DateField::Milliseconds, "date_part('milliseconds', now())"),
            (DateField::Minute, "date_part('minute', now())"),
            (DateField::Month, "date_part('month', now())"),
            (DateField::Quarter, "date_part('quarter', now())"),
            (DateField::Second, "date_part('second', now())"),
            (DateField::Timezone, "date_part('timezone', now())"),
            (DateField::TimezoneHour, "date_part('timezone_hour', now())"),
            (
                DateField::TimezoneMinute,
                "date_part('timezone_minute', now())",
            ),
            (DateField::Week, "date_part('week', now())"),
            (DateField::Year, "date_part('year', now())"),
        ];

        for (field, expected) in cases {
            let sql = render_expr(&Expr::date_part(field, Expr::now()));
            assert_eq!(sql, expected, "field {:?}", field);
        }
    }

    #[test]
    fn test_date_trunc_all_precisions() {
        let cases = [
            (DatePrecision::Microseconds, "microseconds"),
            (DatePrecision::Milliseconds, "milliseconds"),
            (DatePrecision::Second, "second"),
            (DatePrecision::Minute, "minute"),
            (DatePrecision::Hour, "hour"),
            (DatePrecision::Day, "day"),
            (DatePrecision::Week, "week"),
            (DatePrecision::Month, "month"),
            (DatePrecision::Quarter, "quarter"),
            (DatePrecision::Year, "year"),
            (DatePrecision::Decade, "decade"),
            (DatePrecision::Century, "century"),
            (DatePrecision::Millennium, "millennium"),
        ];

        for (precision, keyword) in cases {
            let sql = render_expr(&Expr::date_trunc(precision, Expr::now()));
            assert_eq!(sql, format!("date_trunc('{}', now())", keyword));
        }
    }

    #[test]
    fn test_date_part_of_column() {
        let query = SelectQuery::new(vec![Expr::date_part(
            DateField::Year,
            Expr::column("events", "created_at"),
        )]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT date_part('year', "created_at") FROM "events""#
        );
    }
}

mod quoting_tests {
    use super::*;

    #[test]
    fn test_quote_ident_doubles_embedded_quotes() {
        assert_eq!(quote_ident("users"), "\"users\"");
        assert_eq!(quote_ident("user\"name"), "\"user\"\"name\"");
    }

    #[test]
    fn test_awkward_identifiers_stay_quoted() {
        let query = SelectQuery::new(vec![Expr::column("odd table", "select")]);
        assert_eq!(
            query.to_sql(),
            r#"SELECT "select" FROM "odd table""#
        );
    }
}
