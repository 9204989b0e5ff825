// tests/board_and_robot.rs
use glam::IVec2;
use tabletop_robot::{
    Board, Command, CommandInterpreter, HEADING_TABLE, Heading, InterpreterConfig, Outcome, Pose,
    Robot, SimulatorError, Turn, interpret,
};

fn setup() -> (Board, Robot) {
    (Board::new(5).unwrap(), Robot::new())
}

#[test]
fn test_zero_sized_board_is_refused() {
    assert_eq!(Board::new(0), Err(SimulatorError::InvalidBoardSize(0)));
}

#[test]
fn test_coordinate_validation() {
    let board = Board::new(5).unwrap();
    assert!(board.is_valid_coordinate(IVec2::new(0, 0)));
    assert!(board.is_valid_coordinate(IVec2::new(4, 4)));
    assert!(!board.is_valid_coordinate(IVec2::new(5, 0)));
    assert!(!board.is_valid_coordinate(IVec2::new(0, 5)));
    assert!(!board.is_valid_coordinate(IVec2::new(-1, 2)));
    assert!(!board.is_valid_coordinate(IVec2::new(2, i32::MIN)));
}

#[test]
fn test_obstructions() {
    let mut board = Board::new(3).unwrap();
    let tile = IVec2::new(1, 2);

    assert!(board.is_empty(tile));
    assert!(board.add_obstruction(tile));
    assert!(!board.is_empty(tile));

    // Second add on the same tile fails and changes nothing.
    assert_eq!(
        board.try_add_obstruction(tile),
        Err(SimulatorError::TileOccupied { x: 1, y: 2 })
    );
    assert_eq!(board.occupied().count(), 1);

    assert!(!board.add_obstruction(IVec2::new(3, 0)));
    assert_eq!(board.occupied().count(), 1);

    assert!(board.remove_obstruction(tile));
    assert!(!board.remove_obstruction(tile));
    assert!(board.is_empty(tile));
}

#[test]
fn test_state_rows_run_top_down() {
    let mut board = Board::new(3).unwrap();
    board.add_obstruction(IVec2::new(0, 2));
    board.add_obstruction(IVec2::new(2, 0));

    assert_eq!(
        board.state(),
        vec![vec![1, 0, 0], vec![0, 0, 0], vec![0, 0, 1]]
    );
    assert_eq!(board.to_string(), "1 0 0\n0 0 0\n0 0 1\n");
}

#[test]
fn test_heading_table_is_consistent() {
    for rule in HEADING_TABLE {
        assert_eq!(*rule.heading.rule(), rule);
        // Turning back undoes a turn.
        assert_eq!(rule.left.turned(Turn::Right), rule.heading);
        assert_eq!(rule.right.turned(Turn::Left), rule.heading);
        // Displacements are unit steps.
        assert_eq!(rule.displacement.x.abs() + rule.displacement.y.abs(), 1);
        // Opposite headings move in opposite directions.
        let opposite = rule.heading.turned(Turn::Left).turned(Turn::Left);
        assert_eq!(opposite.displacement(), -rule.displacement);
    }
}

#[test]
fn test_heading_parse() {
    assert_eq!("north".parse::<Heading>(), Ok(Heading::North));
    assert_eq!(" West ".parse::<Heading>(), Ok(Heading::West));
    assert!(matches!(
        "UP".parse::<Heading>(),
        Err(SimulatorError::MalformedCommand(_))
    ));
    assert_eq!(Heading::South.to_string(), "SOUTH");
}

#[test]
fn test_unplaced_robot() {
    let (mut board, mut robot) = setup();
    assert!(!robot.is_placed());
    assert_eq!(robot.report(), None);

    robot.rotate(Turn::Left);
    assert_eq!(robot.heading(), None);
    assert_eq!(robot.move_forward(&mut board), Err(SimulatorError::NotPlaced));
}

#[test]
fn test_place_marks_tile() {
    let (mut board, mut robot) = setup();
    robot.place(IVec2::new(2, 3), Heading::East, &mut board).unwrap();

    assert_eq!(
        robot.pose(),
        Some(Pose {
            position: IVec2::new(2, 3),
            heading: Heading::East,
        })
    );
    assert_eq!(robot.position(), Some(IVec2::new(2, 3)));
    assert_eq!(robot.heading(), Some(Heading::East));
    assert!(robot.is_on(&board));
    assert!(!board.is_empty(IVec2::new(2, 3)));
    assert_eq!(robot.report().as_deref(), Some("2,3,EAST"));
}

#[test]
fn test_move_carries_the_obstruction() {
    let (mut board, mut robot) = setup();
    robot.place(IVec2::new(0, 0), Heading::North, &mut board).unwrap();
    robot.move_forward(&mut board).unwrap();

    assert!(board.is_empty(IVec2::new(0, 0)));
    assert!(!board.is_empty(IVec2::new(0, 1)));
    assert_eq!(board.occupied().count(), 1);
}

#[test]
fn test_blocked_move_leaves_everything_alone() {
    let (mut board, mut robot) = setup();
    robot.place(IVec2::new(4, 4), Heading::North, &mut board).unwrap();
    let before = board.state();

    assert_eq!(
        robot.move_forward(&mut board),
        Err(SimulatorError::OutOfBounds { x: 4, y: 5 })
    );
    assert_eq!(board.state(), before);
    assert_eq!(robot.report().as_deref(), Some("4,4,NORTH"));
}

#[test]
fn test_reposition_frees_old_tile() {
    let (mut board, mut robot) = setup();
    robot.place(IVec2::new(1, 1), Heading::North, &mut board).unwrap();
    robot.place(IVec2::new(3, 3), Heading::South, &mut board).unwrap();

    assert!(board.is_empty(IVec2::new(1, 1)));
    assert_eq!(board.occupied().collect::<Vec<_>>(), vec![IVec2::new(3, 3)]);

    // The freed tile can be taken again.
    assert!(board.add_obstruction(IVec2::new(1, 1)));
}

#[test]
fn test_two_robots_share_a_board() {
    let (mut board, mut first) = setup();
    let mut second = Robot::new();

    first.place(IVec2::new(0, 0), Heading::East, &mut board).unwrap();
    second.place(IVec2::new(1, 0), Heading::West, &mut board).unwrap();

    assert_eq!(
        first.move_forward(&mut board),
        Err(SimulatorError::TileOccupied { x: 1, y: 0 })
    );
    assert_eq!(
        first.place(IVec2::new(1, 0), Heading::North, &mut board),
        Err(SimulatorError::TileOccupied { x: 1, y: 0 })
    );
    // Neither heading nor position moved on the failed reposition.
    assert_eq!(first.report().as_deref(), Some("0,0,EAST"));

    assert_eq!(
        second.place(IVec2::new(0, 0), Heading::North, &mut board),
        Err(SimulatorError::TileOccupied { x: 0, y: 0 })
    );
    assert_eq!(board.occupied().count(), 2);
}

#[test]
fn test_custom_keywords() {
    let mut interpreter = CommandInterpreter::new(InterpreterConfig {
        board_size: 3,
        exit_word: "quit".to_string(),
    });
    interpreter.set_keyword("fwd", Command::Move);
    interpreter.set_keyword("where", Command::Report);

    let mut board = interpreter.new_board().unwrap();
    let mut robot = Robot::new();

    assert_eq!(interpreter.parse("QUIT"), Command::Exit);
    assert_eq!(interpreter.parse("EXIT"), Command::Unknown("EXIT".to_string()));
    // Standard words are not registered on a bare interpreter.
    assert_eq!(interpreter.parse("move"), Command::Unknown("move".to_string()));

    interpreter.interpret("PLACE 0,0,NORTH", &mut board, &mut robot);
    interpreter.interpret("fwd", &mut board, &mut robot);
    interpreter.interpret("fwd", &mut board, &mut robot);
    interpreter.interpret("fwd", &mut board, &mut robot);
    assert_eq!(
        interpreter.interpret("Where", &mut board, &mut robot),
        Outcome::ReportText("0,2,NORTH".to_string())
    );
}

#[test]
fn test_parse_place() {
    let interpreter = CommandInterpreter::default();
    assert_eq!(
        interpreter.parse("place 3 , 1 , west"),
        Command::Place {
            position: IVec2::new(3, 1),
            heading: Heading::West,
        }
    );
    assert_eq!(interpreter.parse("left"), Command::Left);
    assert_eq!(interpreter.parse("RIGHT\n"), Command::Right);
}

#[test]
fn test_robot_stays_on_its_own_board() {
    let mut home = Board::new(5).unwrap();
    let mut other = Board::new(5).unwrap();
    let mut robot = Robot::new();

    interpret("PLACE 0,0,NORTH", &mut home, &mut robot);
    for line in ["MOVE", "LEFT", "RIGHT", "REPORT", "PLACE 2,2,EAST", "PLACE 0,0,SOUTH"] {
        assert_eq!(
            interpret(line, &mut other, &mut robot),
            Outcome::Rejected(SimulatorError::ForeignBoard),
            "{line}"
        );
    }
    assert_eq!(robot.move_forward(&mut other), Err(SimulatorError::ForeignBoard));

    // Nothing leaked onto the other board and the robot never moved.
    assert_eq!(other.occupied().count(), 0);
    assert_eq!(home.occupied().collect::<Vec<_>>(), vec![IVec2::new(0, 0)]);
    assert!(robot.is_on(&home));
    assert!(!robot.is_on(&other));
    assert_eq!(
        interpret("REPORT", &mut home, &mut robot),
        Outcome::ReportText("0,0,NORTH".to_string())
    );
}

#[test]
fn test_board_round_trips_through_json() {
    let mut board = Board::new(4).unwrap();
    board.add_obstruction(IVec2::new(1, 3));

    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, board);
    assert_ne!(restored.id(), board.id());
}

#[test]
fn test_invalid_board_json_is_refused() {
    let cases = [
        r#"{"side_length":0,"occupied":[]}"#,
        r#"{"side_length":2,"occupied":[[7,-3]]}"#,
        r#"{"side_length":2,"occupied":[[2,0]]}"#,
    ];
    for json in cases {
        assert!(serde_json::from_str::<Board>(json).is_err(), "{json}");
    }

    let board: Board = serde_json::from_str(r#"{"side_length":2,"occupied":[[1,0]]}"#).unwrap();
    assert_eq!(board.state(), vec![vec![0, 0], vec![0, 1]]);
}
