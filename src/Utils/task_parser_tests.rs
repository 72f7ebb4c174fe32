/////////////////////////////TESTS////////////////////////////////////////////////////
/*
document level tests:
Basic parsing test
Comments and blank lines
Template usage test
Empty and malformed documents
File-based parsing test
*/

#[cfg(test)]
mod tests1 {

    use crate::Utils::task_parser::{
        Value, filter_comments, parse_document, parse_document_as, template_from,
    };
    use std::fs;
    use tempfile::tempdir;

    const TASK: &str = "problem
  equation: dy/dx = x + y
  x0: 0
  y0: 1.0
  step: 0.1
  x_end: 1
output
  table: true
  csv: result.csv
  loglevel: warn
";

    #[test]
    fn test_parse_document_basic() {
        let (remaining, doc) = parse_document(TASK).unwrap();
        assert!(remaining.trim().is_empty());
        assert_eq!(doc.len(), 2);
        let problem = &doc["problem"];
        assert_eq!(
            problem["equation"],
            Some(vec![Value::String("dy/dx = x + y".to_string())])
        );
        assert_eq!(problem["x0"], Some(vec![Value::Integer(0)]));
        assert_eq!(problem["y0"], Some(vec![Value::Float(1.0)]));
        assert_eq!(problem["step"], Some(vec![Value::Float(0.1)]));
        let output = &doc["output"];
        assert_eq!(output["table"], Some(vec![Value::Boolean(true)]));
        assert_eq!(
            output["csv"],
            Some(vec![Value::String("result.csv".to_string())])
        );
    }

    #[test]
    fn test_parse_document_with_comments() {
        let input = "// task for y' = y
problem

  # the equation
  equation: y
  x0: 0
% done
";
        let filtered = filter_comments(input);
        assert_eq!(filtered, "problem\n  equation: y\n  x0: 0");
        let doc = parse_document_as(input, None).unwrap();
        assert_eq!(
            doc["problem"]["equation"],
            Some(vec![Value::String("y".to_string())])
        );
    }

    #[test]
    fn test_parse_document_with_template() {
        let template = template_from(&[
            ("problem", &["equation", "x0", "y0", "step", "x_end"][..]),
            ("output", &["table", "plot"][..]),
        ]);
        let doc = parse_document_as("problem\n equation: 2*x\n x0: 0\n", Some(&template)).unwrap();
        assert_eq!(doc["problem"]["x0"], Some(vec![Value::Integer(0)]));
        assert_eq!(doc["problem"]["step"], None);
        assert_eq!(doc["output"]["plot"], None);
        assert_eq!(doc["output"].len(), 2);
    }

    #[test]
    fn test_parse_document_empty_and_malformed() {
        assert!(parse_document_as("", None).is_err());
        assert!(parse_document_as("// only a comment", None).is_err());
        // key-value pair without a section title
        assert!(parse_document_as("x0: 1\n", None).is_err());
        // a section title without keys leaves unparsed input
        assert!(parse_document_as("problem\n x0: 1\noutput\n", None).is_err());
    }

    #[test]
    fn test_parse_document_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("task.txt");
        fs::write(&path, TASK).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let doc = parse_document_as(&content, None).unwrap();
        assert_eq!(
            doc["output"]["loglevel"],
            Some(vec![Value::String("warn".to_string())])
        );
        assert_eq!(doc["problem"]["x_end"], Some(vec![Value::Integer(1)]));
    }

    #[test]
    fn test_windows_line_endings() {
        let doc = parse_document_as("problem\r\n  x0: 2\r\n  y0: 3\r\n", None).unwrap();
        assert_eq!(doc["problem"]["x0"], Some(vec![Value::Integer(2)]));
        assert_eq!(doc["problem"]["y0"], Some(vec![Value::Integer(3)]));
    }
}
