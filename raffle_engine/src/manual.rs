/*!

This is the long-form manual for `raffle_engine` and `raffledraw`.

## Datasets

Each raffle pool is backed by three tabular files:

* the **participants** file — the mutable list of people still in the
  raffle. It shrinks every time someone wins.
* the **winner history** file — an append-only chronological log of
  winners. Membership in this file is what excludes someone from future
  draws.
* the **pristine snapshot** — a read-only copy of the original
  participant list, used only by the `reset` command to restore the
  participants file.

All three share the same header. The identity column (for example
`FULL NAME`) is the key used to match a person across the files. Matching
is exact: no trimming, no case folding.

Duplicate rows sharing an identity are tolerated. They proportionally
increase that person's odds, and all of them are removed together when
that person wins.

## File formats

* `csv` — read and written. The first row is the header.
* `xlsx` — read only (first worksheet unless configured otherwise).
  Useful when the original participant list was produced as an Excel
  spreadsheet; mutable state is always written back as CSV.

## Commands

* `raffledraw draw [--pool NAME]` — computes the active pool
  (participants minus prior winners), shows an optional animated preview,
  draws one winner uniformly at random, appends it to the history and
  removes every matching participant row. `--no-spin` or
  `--spin-frames 0` skips the preview; the outcome is identical either
  way. `--seed` makes the committed draw reproducible.
* `raffledraw view [--pool NAME] [--kind active|history]` — renders the
  requested table without touching any file.
* `raffledraw reset [--pool NAME]` — truncates the winner history to its
  header and restores the participants file from the pristine snapshot.
  When the snapshot is missing, the history is still cleared and the
  participants file is left untouched; the missing snapshot is reported
  as an error.

## Configuration

Pools are described in a JSON file (default `raffle.json` in the data
directory). When no configuration file exists, two built-in pools are
provided: `participants` (columns `CONTROL NO., FULL NAME, POSITION,
REGION/SOC, HUB`) and `admin` (columns `Name, Role`).

```json
{
  "pools": [
    {
      "name": "participants",
      "participantsFile": "participants.csv",
      "historyFile": "winner_history.csv",
      "snapshotFile": "original_participants.xlsx",
      "identityColumn": "FULL NAME",
      "columns": ["CONTROL NO.", "FULL NAME", "POSITION", "REGION/SOC", "HUB"]
    }
  ]
}
```

Pools are fully independent: drawing from or resetting one pool never
opens the files of another.

*/
